mod hostname;
